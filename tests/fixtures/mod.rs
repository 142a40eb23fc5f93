//! Shared XMP packets for integration tests

#![allow(dead_code)]

/// Packet written by a video editor: typed schemas, structures, nested
/// documents and one namespace without a schema
pub const PREMIERE_PACKET: &str = r#"<?xpacket begin="" id="W5M0MpCehiHzreSzNTczkc9d"?>
<x:xmpmeta xmlns:x="adobe:ns:meta/" x:xmptk="Adobe XMP Core 5.5-c021 79.155241, 2013/11/25-21:10:40        ">
 <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description rdf:about=""
    xmlns:xmp="http://ns.adobe.com/xap/1.0/"
    xmlns:xmpDM="http://ns.adobe.com/xmp/1.0/DynamicMedia/"
    xmlns:stDim="http://ns.adobe.com/xap/1.0/sType/Dimensions#"
    xmlns:xmpMM="http://ns.adobe.com/xap/1.0/mm/"
    xmlns:stEvt="http://ns.adobe.com/xap/1.0/sType/ResourceEvent#"
    xmlns:stRef="http://ns.adobe.com/xap/1.0/sType/ResourceRef#"
    xmlns:dc="http://purl.org/dc/elements/1.1/"
    xmlns:creatorAtom="http://ns.adobe.com/creatorAtom/1.0/"
   xmp:CreateDate="2015-03-23T22:18:20-04:00"
   xmp:ModifyDate="2015-03-23T22:18:29-04:00"
   xmp:MetadataDate="2015-03-23T22:18:29-04:00"
   xmp:CreatorTool="Adobe Premiere Pro CC (Macintosh)"
   xmpDM:startTimeScale="24"
   xmpDM:startTimeSampleSize="1"
   xmpDM:videoFrameRate="24.000000"
   xmpDM:videoFieldOrder="Progressive"
   xmpDM:videoPixelAspectRatio="1/1"
   xmpDM:audioSampleRate="48000"
   xmpDM:audioSampleType="16Int"
   xmpDM:audioChannelType="Stereo"
   xmpMM:InstanceID="xmp.iid:5d95d24a-457a-44bd-a92c-0786456548fd"
   xmpMM:DocumentID="009fd353-c6ed-1e3f-5ae1-c92200000053"
   xmpMM:OriginalDocumentID="xmp.did:d1ae4cc5-a458-4eb7-9394-30ec546e2528"
   dc:format="QuickTime">
   <xmpDM:duration
    xmpDM:value="203"
    xmpDM:scale="1/24"/>
   <xmpDM:altTimecode
    xmpDM:timeValue="01:02:03:04"
    xmpDM:timeFormat="24Timecode"/>
   <xmpDM:videoFrameSize
    stDim:w="1280"
    stDim:h="720"
    stDim:unit="pixel"/>
   <xmpDM:startTimecode
    xmpDM:timeFormat="24Timecode"
    xmpDM:timeValue="00:00:00:00"/>
   <xmpDM:projectRef
    xmpDM:type="movie"/>
   <xmpMM:History>
    <rdf:Seq>
     <rdf:li
      stEvt:action="saved"
      stEvt:instanceID="a985eefc-d371-6b9c-d554-0f0200000080"
      stEvt:when="2015-03-23T22:18:29-04:00"
      stEvt:softwareAgent="Adobe Premiere Pro CC (Macintosh)"
      stEvt:changed="/"/>
     <rdf:li
      stEvt:action="created"
      stEvt:instanceID="xmp.iid:8c22b83c-cfd3-43fe-b402-2d96d4a3d4d4"
      stEvt:when="2015-03-23T22:18:20-04:00"
      stEvt:softwareAgent="Adobe Premiere Pro CC (Macintosh)"/>
     <rdf:li
      stEvt:action="saved"
      stEvt:instanceID="xmp.iid:3f3bd4e9-9370-4b25-bb36-ac7d7184bbd5"
      stEvt:when="2015-03-23T22:18:29-04:00"
      stEvt:softwareAgent="Adobe Premiere Pro CC (Macintosh)"
      stEvt:changed="/"/>
     <rdf:li
      stEvt:action="saved"
      stEvt:instanceID="xmp.iid:5d95d24a-457a-44bd-a92c-0786456548fd"
      stEvt:when="2015-03-23T22:18:29-04:00"
      stEvt:softwareAgent="Adobe Premiere Pro CC (Macintosh)"
      stEvt:changed="/metadata"/>
    </rdf:Seq>
   </xmpMM:History>
   <xmpMM:Ingredients>
    <rdf:Bag>
     <rdf:li
      stRef:instanceID="47a9a75b-3a6b-0990-173c-d5a900000074"
      stRef:documentID="aeffd160-efa3-71bf-610a-09bd00000047"
      stRef:fromPart="time:0d2154055680000f254016000000"
      stRef:toPart="time:0d2154055680000f254016000000"
      stRef:filePath="CornerKick.mov"
      stRef:maskMarkers="None"/>
     <rdf:li
      stRef:instanceID="47a9a75b-3a6b-0990-173c-d5a900000074"
      stRef:documentID="aeffd160-efa3-71bf-610a-09bd00000047"
      stRef:fromPart="time:0d2154055680000f254016000000"
      stRef:toPart="time:0d2154055680000f254016000000"
      stRef:filePath="CornerKick.mov"
      stRef:maskMarkers="None"/>
    </rdf:Bag>
   </xmpMM:Ingredients>
   <xmpMM:Pantry>
    <rdf:Bag>
     <rdf:li>
      <rdf:Description
       xmp:CreateDate="2014-03-20T21:34:41Z"
       xmp:ModifyDate="2015-03-23T22:10:43-04:00"
       xmp:MetadataDate="2015-03-23T22:10:43-04:00"
       xmpDM:startTimeScale="5000"
       xmpDM:startTimeSampleSize="200"
       xmpMM:InstanceID="47a9a75b-3a6b-0990-173c-d5a900000074"
       xmpMM:DocumentID="aeffd160-efa3-71bf-610a-09bd00000047"
       xmpMM:OriginalDocumentID="xmp.did:cd1f24ab-d821-4bad-aa79-bdc9baaabe14">
      <xmpDM:duration
       xmpDM:value="21200"
       xmpDM:scale="1/2500"/>
      <xmpDM:altTimecode
       xmpDM:timeValue="00:00:00:00"
       xmpDM:timeFormat="25Timecode"/>
      <xmpMM:History>
       <rdf:Seq>
        <rdf:li
         stEvt:action="saved"
         stEvt:instanceID="47a9a75b-3a6b-0990-173c-d5a900000074"
         stEvt:when="2015-03-23T22:10:43-04:00"
         stEvt:softwareAgent="Adobe Premiere Pro CC (Macintosh)"
         stEvt:changed="/"/>
       </rdf:Seq>
      </xmpMM:History>
      </rdf:Description>
     </rdf:li>
    </rdf:Bag>
   </xmpMM:Pantry>
   <xmpMM:DerivedFrom
    stRef:instanceID="xmp.iid:8c22b83c-cfd3-43fe-b402-2d96d4a3d4d4"
    stRef:documentID="xmp.did:8c22b83c-cfd3-43fe-b402-2d96d4a3d4d4"
    stRef:originalDocumentID="xmp.did:8c22b83c-cfd3-43fe-b402-2d96d4a3d4d4"/>
   <creatorAtom:windowsAtom
    creatorAtom:extension=".prproj"
    creatorAtom:invocationFlags="/L"/>
   <creatorAtom:macAtom
    creatorAtom:applicationCode="1347449455"
    creatorAtom:invocationAppleEvent="1129468018"
    creatorAtom:posixProjectPath="/Users/alandabul/Documents/Adobe/Premiere Pro/7.0/Untitled.prproj"/>
  </rdf:Description>
 </rdf:RDF>
</x:xmpmeta>





















<?xpacket end="w"?>"#;

/// One Alt title and one Bag of subjects
pub const DC_PACKET: &str = r#"<x:xmpmeta xmlns:x="adobe:ns:meta/">
 <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description rdf:about="" xmlns:dc="http://purl.org/dc/elements/1.1/">
   <dc:title>
    <rdf:Alt>
     <rdf:li xml:lang="x-default">Hello</rdf:li>
    </rdf:Alt>
   </dc:title>
   <dc:subject>
    <rdf:Bag>
     <rdf:li>a</rdf:li>
     <rdf:li>b</rdf:li>
    </rdf:Bag>
   </dc:subject>
  </rdf:Description>
 </rdf:RDF>
</x:xmpmeta>"#;

/// Properties split over two descriptions, plus a namespace without a schema
pub const SPLIT_PACKET: &str = r#"<?xpacket begin="﻿" id="W5M0MpCehiHzreSzNTczkc9d"?>
<x:xmpmeta xmlns:x="adobe:ns:meta/" x:xmptk="Test Toolkit 1.0">
 <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description rdf:about=""
    xmlns:xmp="http://ns.adobe.com/xap/1.0/"
    xmlns:acme="http://acme.example.com/ns/1.0/"
   xmp:CreatorTool="Acme Cam 3"
   acme:serial="A-1234">
   <acme:lens acme:model="Wide" acme:focal="24">
    <acme:coating>multi &amp; hard</acme:coating>
   </acme:lens>
  </rdf:Description>
  <rdf:Description rdf:about=""
    xmlns:dc="http://purl.org/dc/elements/1.1/"
    xmlns:xmp="http://ns.adobe.com/xap/1.0/"
   xmp:Rating="4">
   <dc:creator>
    <rdf:Seq>
     <rdf:li>Zoe</rdf:li>
     <rdf:li>Adam</rdf:li>
     <rdf:li>Mia</rdf:li>
    </rdf:Seq>
   </dc:creator>
   <dc:description>
    <rdf:Alt>
     <rdf:li xml:lang="en">A red barn</rdf:li>
     <rdf:li xml:lang="x-default">A red barn</rdf:li>
    </rdf:Alt>
   </dc:description>
  </rdf:Description>
 </rdf:RDF>
</x:xmpmeta>
<?xpacket end="w"?>"#;
